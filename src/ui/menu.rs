/// Actions offered by the main menu, in the order they are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    AddBook,
    ViewBooks,
    LoanBook,
    ReturnBook,
    DeleteBook,
    SearchBook,
    Exit,
}

impl MenuChoice {
    pub(crate) const ALL: [MenuChoice; 7] = [
        MenuChoice::AddBook,
        MenuChoice::ViewBooks,
        MenuChoice::LoanBook,
        MenuChoice::ReturnBook,
        MenuChoice::DeleteBook,
        MenuChoice::SearchBook,
        MenuChoice::Exit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuChoice::AddBook => "Add New Book",
            MenuChoice::ViewBooks => "View All Books",
            MenuChoice::LoanBook => "Loan Book (Change Status to Loaned)",
            MenuChoice::ReturnBook => "Return Book (Change Status to Available)",
            MenuChoice::DeleteBook => "Delete Book",
            MenuChoice::SearchBook => "Search Book",
            MenuChoice::Exit => "Exit",
        }
    }

    /// 1-based number shown next to the label.
    pub(crate) fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |index| index + 1)
    }

    /// Map the user's answer to a menu entry. Anything but an exact option
    /// number is rejected, so `+3` or `07` do not sneak through.
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let answer = input.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.number().to_string() == answer)
    }
}
