use crate::domain::value_objects::bounded_string;

bounded_string!(
    /// Login name; unique among non-deleted users
    ///
    /// # Invariants
    /// - Must not be blank
    /// - At most 100 characters
    ///
    /// # Example
    /// ```
    /// use notes_api::domain::user::value_objects::Login;
    ///
    /// let login = Login::new("jdoe").expect("valid login");
    /// assert_eq!(login.as_str(), "jdoe");
    /// ```
    Login,
    "Login"
);

bounded_string!(
    /// Password, stored as given
    Password,
    "Password"
);

bounded_string!(
    /// Given name of the user
    FirstName,
    "FirstName"
);
