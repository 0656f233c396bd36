#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        declare in class is OK
        "Foo"
    }

    tests! {
        instantiate in class is OK
        "Foo instance"
    }

    tests! {
        method in class is OK
        "hello"
    }

    tests! {
        fields in class is OK
        "4"
    }

    tests! {
        fields_are_per_instance in class is OK
        "a"
        "b"
    }

    tests! {
        undefined_property in class is ERR(70)
        "[line 2] Error at 'bar': Undefined property 'bar'."
    }

    tests! {
        get_on_non_instance in class is ERR(70)
        "[line 2] Error at 'b': Only instances have properties."
    }

    tests! {
        set_on_non_instance in class is ERR(70)
        "[line 2] Error at 'b': Only instances have fields."
    }
}
