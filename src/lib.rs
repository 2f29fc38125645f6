//! Payroll Engine for monthly employee payrolls
//!
//! This crate computes the monthly payroll of salaried, hourly, commission and
//! temporary employees: gross pay, seniority and sales bonuses, meal benefits,
//! statutory deductions and net pay, with an itemized audit trace for every
//! rule decision. Calculations are guarded by the pay period's lifecycle and
//! stored once per employee and period.
//!
//! The [`calculation`] module is pure and deterministic; [`service`] wires it
//! to employee, period and payroll stores; [`api`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
