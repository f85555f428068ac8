pub mod payment;
pub mod salary;
pub mod staff;
pub mod task;
