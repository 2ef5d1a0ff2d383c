//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fmt;

use csv_record_codec::{csv_record, FieldMap};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

csv_record! {
    Person {
        first_name: String => "FirstName",
        last_name: String => "LastName",
        age: i32 => "Age",
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

pub fn person(first_name: &str, last_name: &str, age: i32) -> Person {
    Person {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age,
    }
}

pub fn persons() -> Vec<Person> {
    vec![
        person("Alex", "Friedman", 27),
        person("Jack", "Bauer", 45),
        person("Cloe", "O'Brien", 35),
        person("John", "Doe", 30),
        person("Grace", "Hooper", 18),
    ]
}

pub fn person_map() -> FieldMap<Person> {
    FieldMap::new()
        .map("FirstName", "forename")
        .map("LastName", "surname")
        .map("Age", "age")
}

#[derive(Debug, Default, Clone)]
pub struct Account {
    pub owner: Person,
    pub balance: f64,
}

csv_record! {
    Account {
        owner: Person => "Owner"; nested,
        balance: f64 => "Balance",
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StockQuote {
    pub ticker: String,
    pub date: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

csv_record! {
    StockQuote {
        ticker: String => "Ticker",
        date: i64 => "Date",
        open: f64 => "Open",
        high: f64 => "High",
        low: f64 => "Low",
        close: f64 => "Close",
        volume: f64 => "Volume",
    }
}

pub fn stock_quote_map() -> FieldMap<StockQuote> {
    FieldMap::new()
        .map("Ticker", "<TICKER>")
        .map("Date", "<DTYYYYMMDD>")
        .map("Open", "<OPEN>")
        .map("High", "<HIGH>")
        .map("Low", "<LOW>")
        .map("Close", "<CLOSE>")
        .map("Volume", "<VOL>")
}

pub const TEST_STOCK: &str = "<TICKER>,<DTYYYYMMDD>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<VOL>\r\n\
testStock,20171110,10.5,11.25,10.1,11,15000\r\n\
testStock,20171120,11,11.9,10.75,11.8,23500.5\r\n";
