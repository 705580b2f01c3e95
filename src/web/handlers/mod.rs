// Dashboard request handlers

pub mod pages;
