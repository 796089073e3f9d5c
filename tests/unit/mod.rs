mod harness_tests;
