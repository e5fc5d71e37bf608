use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No input file given. Usage: gradscan [OPTIONS] <PATH>")]
    MissingPath,

    #[error("Input file does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Failed to write output: {0}")]
    Output(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
