#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        concat in string is OK
        "one two"
    }

    tests! {
        multiline in string is OK
        "one"
        "two"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 1] Error: Unterminated string."
    }

    tests! {
        unterminated_line in string is ERR(65)
        "[line 2] Error: Unterminated string."
    }
}
