//! PortfolioApp - owns the choreography driver and builds the root element

use crate::config::load_config;
use crate::driver::ChoreographyDriver;
use crate::views;
use zoon::*;

pub struct PortfolioApp {
    pub driver: ChoreographyDriver,
}

impl PortfolioApp {
    pub fn new() -> Self {
        let config = load_config();
        Self {
            driver: ChoreographyDriver::new(&config),
        }
    }

    pub fn root(&self) -> impl Element {
        views::root(self.driver.clone())
    }
}
