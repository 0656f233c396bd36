#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comments in comment is OK
        "ok"
        "end"
    }

    tests! {
        only_comment in comment is OK
    }
}
