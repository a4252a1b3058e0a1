mod multipart_tests;
