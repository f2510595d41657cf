//! Shared test utilities for cohort-db unit tests.
