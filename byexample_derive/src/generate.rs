mod extraction;
mod field;
