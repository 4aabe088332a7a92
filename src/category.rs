#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    All,
    Tech,
    Economy,
    Politics,
    World,
    Sports,
}

impl Category {
    /// Sidebar order.
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Tech,
        Category::Economy,
        Category::Politics,
        Category::World,
        Category::Sports,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Tech => "tech",
            Category::Economy => "economy",
            Category::Politics => "politics",
            Category::World => "world",
            Category::Sports => "sports",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Tech => "Tech/IT",
            Category::Economy => "Economy",
            Category::Politics => "Politics",
            Category::World => "World",
            Category::Sports => "Sports",
        }
    }

    /// Search expression sent to the news endpoint. `None` for the catch-all category.
    pub fn keywords(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Tech => Some("technology OR AI OR software OR startup"),
            Category::Economy => Some("economy OR finance OR stock OR business"),
            Category::Politics => Some("politics OR government OR election"),
            Category::World => Some("international OR global OR world news"),
            Category::Sports => Some("sports OR football OR baseball OR soccer"),
        }
    }

    pub fn from_code(code: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|&c| c == self)
            .unwrap_or(0)
    }

    /// Step through the sidebar, wrapping at both ends.
    pub fn cycle(self, delta: isize) -> Category {
        let len = Category::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Category::ALL[next as usize]
    }
}

/// Display label for a raw category code; unknown codes are shown as-is.
pub fn label_for_code(code: &str) -> String {
    Category::from_code(code)
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Combine a free-text query with the category keywords into one search expression.
pub fn search_expression(query: &str, category: Category) -> String {
    let query = query.trim();
    match (query.is_empty(), category.keywords()) {
        (false, Some(keywords)) => format!("({}) AND ({})", query, keywords),
        (true, Some(keywords)) => keywords.to_string(),
        (false, None) => query.to_string(),
        (true, None) => "news".to_string(),
    }
}
