mod health_check;
mod users;
mod data_warehouse;
