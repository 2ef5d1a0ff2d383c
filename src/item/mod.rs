/// This module provides the CSV reader, writer and codec engine.
pub mod csv;
