/// Identity behind the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Viewer {
    #[default]
    Anonymous,
    User(i64),
}

impl Viewer {
    pub(crate) fn user_id(self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(id),
        }
    }

    pub(crate) fn is_user(self, user_id: i64) -> bool {
        self.user_id() == Some(user_id)
    }
}
