mod create;
mod delete;
mod fields;
mod read;
mod system;
