mod policy_tests;
mod property_solver_tests;
