pub mod api;
pub mod test;

#[cfg(test)]
mod api_test;
