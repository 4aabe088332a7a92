pub mod demo;
pub mod newsapi;
pub mod openai;

#[cfg(test)]
pub mod test_server;
