// Test modules for Bookstall


#[cfg(test)]
pub mod record_tests;




#[cfg(test)]
pub mod concurrency_tests;
