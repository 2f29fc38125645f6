//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll rule sets from YAML
//! files: jurisdiction metadata plus every rate and threshold the engine uses.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/co_2025").unwrap();
//! println!("Loaded rules: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_MEAL_ALLOWANCE, DEFAULT_MONTHLY_NORMAL_HOURS, DEFAULT_OCCUPATIONAL_RISK_PERCENTAGE,
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_SALES_BONUS_PERCENTAGE, DEFAULT_SALES_THRESHOLD,
    DEFAULT_SAVINGS_FUND_PERCENTAGE, DEFAULT_SENIORITY_BONUS_PERCENTAGE,
    DEFAULT_SOCIAL_SECURITY_PERCENTAGE, HourlyRules, JurisdictionMetadata, MAX_RULE_RATE,
    MealAllowanceRules, PayrollConfig, PayrollRules, SalesBonusRules, SavingsFundRules,
    SeniorityBonusRules, StatutoryDeductionRules,
};
