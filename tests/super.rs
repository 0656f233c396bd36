#[macro_use]
mod common;

#[cfg(test)]
mod super_expr {
    tests! {
        chain in super_expr is OK
        "A"
        "B"
    }

    tests! {
        skipped_level in super_expr is OK
        "A method"
    }

    tests! {
        undefined_method in super_expr is ERR(70)
        "[line 4] Error at 'missing': Undefined property 'missing'."
    }

    tests! {
        no_superclass in super_expr is ERR(65)
        "[line 3] Error at 'super': Can't use 'super' in a class with no superclass."
    }

    tests! {
        outside_class in super_expr is ERR(65)
        "[line 1] Error at 'super': Can't use 'super' outside of a class."
    }
}
