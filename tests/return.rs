#[macro_use]
mod common;

#[cfg(test)]
mod return_stmt {
    tests! {
        early in return_stmt is OK
        "early"
    }

    tests! {
        bare in return_stmt is OK
        "nil"
    }

    tests! {
        from_nested_block in return_stmt is OK
        "deep"
    }

    tests! {
        top_level in return_stmt is ERR(65)
        "[line 1] Error at 'return': Can't return from top-level code."
    }
}
