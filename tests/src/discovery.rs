mod apply;
mod integration;
