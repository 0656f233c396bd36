#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        arithmetic_and_print in misc is OK
        "7"
        "9"
        "foobar"
    }

    tests! {
        empty in misc is OK
    }

    tests! {
        unexpected_character in misc is ERR(65)
        "[line 1] Error: Unexpected character: @"
    }
}
