mod swagger_v2_tests;
