#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod cli;
pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
