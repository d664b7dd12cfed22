use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    InvalidCoordinate{token: String} = "Malformed coordinate pair \"{token}\""
}
