//! Endpoint table: every remote operation as a method and a path.
//!
//! Keys are opaque; they are percent-encoded as single path segments.

use reqwest::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Endpoint {
            method,
            path: path.into(),
        }
    }
}

fn segment(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

pub mod user {
    use super::Endpoint;
    use reqwest::Method;

    pub fn check_user() -> Endpoint {
        Endpoint::new(Method::GET, "/user")
    }

    pub fn enroll_user() -> Endpoint {
        Endpoint::new(Method::POST, "/user")
    }

    pub fn delete_user() -> Endpoint {
        Endpoint::new(Method::DELETE, "/user")
    }
}

pub mod folder {
    use super::{segment, Endpoint};
    use reqwest::Method;

    pub fn create_root_folder() -> Endpoint {
        Endpoint::new(Method::POST, "/folder")
    }

    pub fn create_folder(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::POST, format!("/folder/{}", segment(folder_key)))
    }

    pub fn read_folder(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::GET, format!("/folder/{}", segment(folder_key)))
    }

    pub fn root_folder_key() -> Endpoint {
        Endpoint::new(Method::GET, "/folder/root-key")
    }

    pub fn trash_folder_key() -> Endpoint {
        Endpoint::new(Method::GET, "/folder/trash-key")
    }

    pub fn delete_folder(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::DELETE, format!("/folder/{}", segment(folder_key)))
    }

    pub fn move_folder(folder_key: &str, target_key: &str) -> Endpoint {
        Endpoint::new(
            Method::PUT,
            format!(
                "/folder/{}/move/{}",
                segment(folder_key),
                segment(target_key)
            ),
        )
    }

    pub fn rename_folder(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::PUT, format!("/folder/{}", segment(folder_key)))
    }

    pub fn info(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::GET, format!("/folder/{}/info", segment(folder_key)))
    }

    pub fn path(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::GET, format!("/folder/{}/path", segment(folder_key)))
    }
}

pub mod file {
    use super::{segment, Endpoint};
    use reqwest::Method;

    pub fn upload_file(folder_key: &str) -> Endpoint {
        Endpoint::new(Method::POST, format!("/file/{}", segment(folder_key)))
    }

    pub fn download_file(file_key: &str) -> Endpoint {
        Endpoint::new(Method::GET, format!("/file/{}", segment(file_key)))
    }

    pub fn delete_file(file_key: &str) -> Endpoint {
        Endpoint::new(Method::DELETE, format!("/file/{}", segment(file_key)))
    }

    pub fn rename_file(file_key: &str) -> Endpoint {
        Endpoint::new(Method::PUT, format!("/file/{}", segment(file_key)))
    }

    pub fn move_file(file_key: &str, folder_key: &str) -> Endpoint {
        Endpoint::new(
            Method::PUT,
            format!("/file/{}/move/{}", segment(file_key), segment(folder_key)),
        )
    }

    pub fn file_info(file_key: &str) -> Endpoint {
        Endpoint::new(Method::GET, format!("/file/{}/info", segment(file_key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_endpoints_are_keyed_by_folder_key() {
        assert_eq!(folder::read_folder("abc").path, "/folder/abc");
        assert_eq!(folder::read_folder("abc").method, Method::GET);
        assert_eq!(folder::create_folder("abc").method, Method::POST);
        assert_eq!(folder::move_folder("a", "b").path, "/folder/a/move/b");
        assert_eq!(folder::root_folder_key().path, "/folder/root-key");
    }

    #[test]
    fn keys_are_encoded_as_single_segments() {
        assert_eq!(file::download_file("a/b c").path, "/file/a%2Fb%20c");
        assert_eq!(
            file::move_file("k?1", "f#2").path,
            "/file/k%3F1/move/f%232"
        );
    }

    #[test]
    fn user_endpoints_share_a_path() {
        assert_eq!(user::check_user().method, Method::GET);
        assert_eq!(user::enroll_user().method, Method::POST);
        assert_eq!(user::delete_user().method, Method::DELETE);
        assert_eq!(user::delete_user().path, "/user");
    }
}
