pub mod master_service;
