mod test_utils;
mod writer_tests;
