use crate::category::Category;
use crate::models::{NewsApiArticle, NewsApiSource};
use chrono::{DateTime, Duration, Utc};

struct Sample {
    category: Category,
    title: &'static str,
    description: &'static str,
    content: &'static str,
    source: &'static str,
    minutes_ago: i64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        category: Category::Tech,
        title: "Chipmakers race to ship low-power AI accelerators for laptops",
        description: "Several vendors announced neural processing units aimed at running language models locally.",
        content: "Several chip vendors announced neural processing units this week aimed at running language models on laptops without a network connection. Analysts expect the first devices before the holiday season, although battery life claims remain untested.",
        source: "Tech Ledger",
        minutes_ago: 25,
    },
    Sample {
        category: Category::Economy,
        title: "Central bank holds rates steady as inflation cools",
        description: "Policy makers left the benchmark rate unchanged and signalled patience.",
        content: "The central bank kept its benchmark interest rate unchanged on Wednesday, citing a steady decline in consumer prices over the past quarter. Officials said they would wait for more data before considering cuts, and markets rose modestly after the announcement.",
        source: "Market Wire",
        minutes_ago: 95,
    },
    Sample {
        category: Category::Sports,
        title: "Underdogs clinch league title after dramatic final match",
        description: "A stoppage-time goal sealed the first championship in the club's history.",
        content: "A stoppage-time goal handed the club its first league championship on Sunday, capping a season in which few pundits expected them to finish in the top half. Supporters celebrated late into the night around the stadium.",
        source: "Sports Daily",
        minutes_ago: 180,
    },
    Sample {
        category: Category::Politics,
        title: "Parliament passes data privacy bill after lengthy debate",
        description: "The new law limits how companies may share personal data with third parties.",
        content: "Lawmakers approved a data privacy bill late on Thursday that restricts how companies share personal information with advertisers and brokers. Opponents argued the compliance costs would fall hardest on small businesses.",
        source: "Capital Report",
        minutes_ago: 320,
    },
    Sample {
        category: Category::World,
        title: "Coastal cities agree on joint flood defence programme",
        description: "Twelve cities will share funding and engineering data for sea barriers.",
        content: "Representatives from twelve coastal cities signed an agreement to share funding and engineering data for new sea barriers. The programme follows a year of record storm surges that damaged ports and housing.",
        source: "Global Desk",
        minutes_ago: 600,
    },
    Sample {
        category: Category::Tech,
        title: "Open source database project releases long-awaited 2.0",
        description: "The release adds replication and a new storage engine.",
        content: "Maintainers of the open source database shipped version 2.0 with built-in replication and a rewritten storage engine. Early benchmarks from contributors show write throughput roughly doubling on commodity hardware.",
        source: "Dev Weekly",
        minutes_ago: 1500,
    },
    Sample {
        category: Category::Economy,
        title: "Retail sales slip for second month amid weaker demand",
        description: "Spending on electronics and furniture fell the most.",
        content: "Retail sales fell for a second consecutive month as households cut back on electronics and furniture. Economists warned that a third decline would raise concerns about the strength of the recovery.",
        source: "Market Wire",
        minutes_ago: 2000,
    },
    Sample {
        category: Category::Sports,
        title: "Veteran pitcher announces retirement after two decades",
        description: "The left-hander leaves with three championship rings.",
        content: "The veteran left-handed pitcher announced his retirement after twenty seasons, leaving the game with three championship rings and a reputation as one of the most durable starters of his era.",
        source: "Sports Daily",
        minutes_ago: 2900,
    },
    Sample {
        category: Category::World,
        title: "Aid convoys reach remote region after landslides",
        description: "Roads reopened overnight allowing food and medicine through.",
        content: "Aid convoys carrying food and medicine reached the remote mountain region after crews reopened roads blocked by landslides. Local officials said thousands of residents had been cut off for nearly a week.",
        source: "Global Desk",
        minutes_ago: 3600,
    },
    Sample {
        category: Category::Politics,
        title: "Mayoral race tightens ahead of final televised debate",
        description: "New polling shows the two leading candidates within a single point.",
        content: "The two leading candidates in the mayoral race are separated by a single point according to new polling, raising the stakes for the final televised debate on housing and transit.",
        source: "Capital Report",
        minutes_ago: 4400,
    },
    Sample {
        category: Category::Tech,
        title: "Satellite startup completes first in-orbit refuelling test",
        description: "The demonstration could extend the working life of ageing satellites.",
        content: "A satellite servicing startup said it completed the first commercial in-orbit refuelling test, transferring propellant between two spacecraft. The company plans a paid mission for an operator next year.",
        source: "Tech Ledger",
        minutes_ago: 5200,
    },
    Sample {
        category: Category::Economy,
        title: "Shipping costs ease as port congestion clears",
        description: "Container rates on major routes dropped for the fourth week.",
        content: "Container shipping rates on major trade routes dropped for the fourth straight week as congestion at several large ports cleared. Importers said the relief may arrive too late for holiday inventory.",
        source: "Trade Journal",
        minutes_ago: 6100,
    },
    Sample {
        category: Category::World,
        title: "Researchers map deep ocean currents with autonomous gliders",
        description: "A fleet of gliders returned data from depths never sampled before.",
        content: "An international team used a fleet of autonomous gliders to map deep ocean currents, returning temperature and salinity data from depths that had never been sampled. The findings will feed into climate models.",
        source: "Science Today",
        minutes_ago: 7000,
    },
];

/// Built-in article feed used when running without a news API key.
#[derive(Clone, Default)]
pub struct DemoFeed;

impl DemoFeed {
    /// Articles for a category and query, newest first, capped at `page_size`.
    pub fn articles(
        &self,
        category: Category,
        query: &str,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Vec<NewsApiArticle> {
        let needle = query.trim().to_lowercase();
        SAMPLES
            .iter()
            .filter(|s| category == Category::All || s.category == category)
            .filter(|s| {
                needle.is_empty()
                    || s.title.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .take(page_size)
            .map(|s| NewsApiArticle {
                source: Some(NewsApiSource {
                    name: Some(s.source.to_string()),
                }),
                title: Some(s.title.to_string()),
                description: Some(s.description.to_string()),
                content: Some(s.content.to_string()),
                url: Some(format!(
                    "https://example.com/{}/{}",
                    s.category.code(),
                    slug(s.title)
                )),
                url_to_image: None,
                published_at: Some((now - Duration::minutes(s.minutes_ago)).to_rfc3339()),
            })
            .collect()
    }
}

fn slug(title: &str) -> String {
    title
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
