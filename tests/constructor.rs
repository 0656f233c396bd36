#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_args in constructor is OK
        "3"
    }

    tests! {
        early_return in constructor is OK
        "true"
    }

    tests! {
        direct_call_returns_instance in constructor is OK
        "true"
    }

    tests! {
        arity in constructor is ERR(70)
        "[line 4] Error at ')': Expected 2 arguments but got 1."
    }

    tests! {
        return_value in constructor is ERR(65)
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }
}
