#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bound in method is OK
        "Jane"
    }

    tests! {
        binding_identity in method is OK
        "Jane"
        "Jane"
    }

    tests! {
        fields_shadow_methods in method is OK
        "7"
    }
}
