// Service exports
pub mod cache;
pub mod supabase;

pub use cache::{CacheKey, MatchCache};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
