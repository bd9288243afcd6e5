#[macro_export]
macro_rules! here {
    ($e:expr) => {
        format!(
            "{}: {}",
            concat!("at ", file!(), ":", line!(), ":", column!()),
            $e
        )
    };
}

pub const SERVER: &str = "http://localhost:36462";
