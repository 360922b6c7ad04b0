mod authentication_tests;
mod concurrency_tests;
mod service_tests;
