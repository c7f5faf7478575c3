//! Mock server expectation seeding.

pub mod seeder;

pub use seeder::MockSeeder;
