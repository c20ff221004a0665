pub mod city;
pub mod forest;
pub mod interior;
pub mod launch;
pub mod temple;
pub mod underwater;
