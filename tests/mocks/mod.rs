#![allow(dead_code)]

pub mod downloader;
pub mod generator;
pub mod provider;
pub mod recognizer;
pub mod translator;
