pub mod group;
pub mod invite;
pub mod pages;
pub mod user;
