pub mod print_config;
pub mod print_routes;
