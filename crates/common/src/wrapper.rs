/// Declares a transparent newtype over `$wrapped_type` that reads through to
/// the inner value and converts both ways.
///
/// ```ignore
/// wrapper!(#[derive(Debug, Clone, PartialEq, Eq, Hash)] pub Key wraps String);
/// ```
#[macro_export]
macro_rules! wrapper {
    (#[$($attr:meta),*] $new_v:vis $new_type:ident wraps $old_v:vis $wrapped_type:ty) => {
        $(#[$attr])*
        #[repr(transparent)]
        $new_v struct $new_type($old_v $wrapped_type);
        impl $new_type {
            $new_v fn get_ref(&self) -> &$wrapped_type {&self.0}
            $new_v fn move_inner(self) -> $wrapped_type {self.0}
        }
        impl ::std::ops::Deref for $new_type {
            type Target = $wrapped_type;
            fn deref(&self) -> &$wrapped_type {&self.0}
        }
        impl From<$wrapped_type> for $new_type {
            fn from(old: $wrapped_type) -> Self {
                Self(old)
            }
        }
        impl From<$new_type> for $wrapped_type {
            fn from(newt: $new_type) -> Self {
                newt.0
            }
        }
    }
}

#[cfg(test)]
mod test {
    wrapper!(#[derive(Debug, Clone, PartialEq, Eq)] pub Name wraps String);

    #[test]
    fn reads_through_and_converts_back() {
        let n = Name::from("value".to_string());
        assert_eq!(n.len(), 5);
        assert_eq!(n.get_ref(), "value");
        let back: String = n.clone().into();
        assert_eq!(back, n.move_inner());
    }
}
