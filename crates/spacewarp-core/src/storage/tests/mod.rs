mod global_tests;
