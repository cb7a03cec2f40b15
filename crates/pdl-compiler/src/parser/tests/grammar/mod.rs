mod composites_tests;
mod entries_tests;
mod trivia_tests;
