pub mod agent_pool_lifecycle;
pub mod policy_lifecycle;
pub mod property_tests;
pub mod rest_client;
