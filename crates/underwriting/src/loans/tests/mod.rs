mod common;
mod decision;
