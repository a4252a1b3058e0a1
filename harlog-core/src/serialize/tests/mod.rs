mod response_tests;
