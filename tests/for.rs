#[macro_use]
mod common;

#[cfg(test)]
mod for_stmt {
    tests! {
        count in for_stmt is OK
        "0"
        "1"
        "2"
    }

    tests! {
        fibonacci in for_stmt is OK
        "0"
        "1"
        "1"
        "2"
        "3"
        "5"
        "8"
    }

    tests! {
        expression_initializer in for_stmt is OK
        "0"
        "1"
        "2"
    }

    tests! {
        no_increment in for_stmt is OK
        "0"
        "1"
    }
}
