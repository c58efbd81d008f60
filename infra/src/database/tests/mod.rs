mod documents_tests;
