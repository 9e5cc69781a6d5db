pub mod home;
pub mod register;
pub mod register_logic;
pub mod users;
