#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        mutate_outer in block is OK
        "inner"
    }

    tests! {
        nested in block is OK
        "abc"
        "ab"
        "a"
    }
}
