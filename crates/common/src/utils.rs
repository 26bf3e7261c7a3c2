use super::error_handling::*;
use std::str;

/// Decodes bytes read back from a file system.
pub fn bytes_to_string<B: AsRef<[u8]>>(bytes: B) -> MyResult<String> {
    str::from_utf8(bytes.as_ref()).map(str::to_string).my_result()
}

pub trait BytesToStringExt: Sized + AsRef<[u8]> {
    fn to_str(self) -> MyResult<String> {
        bytes_to_string(self)
    }
}
impl<B: Sized + AsRef<[u8]>> BytesToStringExt for B {}

/// Paths written into generated text and output locations always use `/`.
pub fn forward_slashes<S: AsRef<str>>(path: S) -> String {
    path.as_ref().replace('\\', "/")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_utf8_only() {
        assert_eq!(b"partial struct".to_str().unwrap(), "partial struct");
        assert!(vec![0xffu8, 0xfe].to_str().is_err());
    }

    #[test]
    fn backslashes_become_slashes() {
        assert_eq!(forward_slashes("C:\\proj\\Temp"), "C:/proj/Temp");
        assert_eq!(forward_slashes("a/b"), "a/b");
    }
}
