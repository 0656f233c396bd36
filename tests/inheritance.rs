#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_method in inheritance is OK
        "A"
    }

    tests! {
        overriding in inheritance is OK
        "B"
    }

    tests! {
        inherit_init in inheritance is OK
        "3"
    }

    tests! {
        superclass_not_class in inheritance is ERR(70)
        "[line 2] Error at 'NotClass': Superclass must be a class."
    }

    tests! {
        inherit_self in inheritance is ERR(65)
        "[line 1] Error at 'Oops': A class can't inherit from itself."
    }
}
