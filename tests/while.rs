#[macro_use]
mod common;

#[cfg(test)]
mod while_stmt {
    tests! {
        count in while_stmt is OK
        "0"
        "1"
        "2"
    }

    tests! {
        false_condition in while_stmt is OK
        "done"
    }

    tests! {
        return_from_loop in while_stmt is OK
        "4"
    }
}
