#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        define in variable is OK
        "1"
    }

    tests! {
        uninitialized in variable is OK
        "nil"
    }

    tests! {
        assignment_value in variable is OK
        "2"
        "2"
    }

    tests! {
        shadowing in variable is OK
        "inner"
        "outer"
    }

    tests! {
        redefine_global in variable is OK
        "2"
    }

    tests! {
        undefined in variable is ERR(70)
        "[line 1] Error at 'a': Undefined variable 'a'."
    }

    tests! {
        assign_undefined in variable is ERR(70)
        "[line 1] Error at 'a': Undefined variable 'a'."
    }

    tests! {
        redeclare_local in variable is ERR(65)
        "[line 3] Error at 'a': Variable already declared in this scope."
    }

    tests! {
        own_initializer in variable is ERR(65)
        "[line 2] Error at 'a': Can't read local variable in its own initializer."
    }
}
