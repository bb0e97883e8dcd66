pub mod nasa;
pub mod telegram;
pub mod translate;

#[cfg(test)]
mod tests;
