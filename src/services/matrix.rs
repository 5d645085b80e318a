use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::models::{Movie, MovieId, Rating, UserId};

/// Row position of a user in a [`UserItemMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserIndex(pub usize);

/// Column position of a movie in a [`UserItemMatrix`]
///
/// The similarity table is addressed with the same indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex(pub usize);

/// Dense user-by-movie rating matrix
///
/// Rows are users in ascending id order, columns are movies in ascending id
/// order. Unrated cells hold 0.0, the same value as an explicit zero rating.
#[derive(Debug, Clone, PartialEq)]
pub struct UserItemMatrix {
    users: Vec<UserId>,
    items: Vec<MovieId>,
    item_positions: HashMap<MovieId, ItemIndex>,
    /// Row-major, `users.len() * items.len()` cells
    values: Vec<f64>,
    ratings_used: usize,
    dropped_ratings: usize,
}

impl UserItemMatrix {
    /// Joins ratings to the movie table and pivots them into a dense matrix
    ///
    /// Ratings for movies missing from `movies`, and ratings that are not
    /// finite numbers, are dropped and counted in
    /// [`dropped_ratings`](Self::dropped_ratings). Repeated (user, movie)
    /// pairs are averaged into one cell.
    pub fn build(ratings: &[Rating], movies: &[Movie]) -> Self {
        let known: HashSet<MovieId> = movies.iter().map(|m| m.movie_id).collect();

        let mut cells: BTreeMap<(UserId, MovieId), (f64, u32)> = BTreeMap::new();
        let mut users = BTreeSet::new();
        let mut items = BTreeSet::new();
        let mut ratings_used = 0;

        // A NaN or infinite cell would turn its whole column of scores into NaN
        let usable = ratings
            .iter()
            .filter(|r| known.contains(&r.movie_id) && r.rating.is_finite());

        for rating in usable {
            let cell = cells
                .entry((rating.user_id, rating.movie_id))
                .or_insert((0.0, 0));
            cell.0 += rating.rating;
            cell.1 += 1;
            users.insert(rating.user_id);
            items.insert(rating.movie_id);
            ratings_used += 1;
        }

        let dropped_ratings = ratings.len() - ratings_used;
        if dropped_ratings > 0 {
            tracing::debug!(
                dropped = dropped_ratings,
                "Dropped ratings for unknown movies or non-finite values"
            );
        }

        let users: Vec<UserId> = users.into_iter().collect();
        let items: Vec<MovieId> = items.into_iter().collect();

        let user_positions: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let item_positions: HashMap<MovieId, ItemIndex> = items
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, ItemIndex(i)))
            .collect();

        let n_items = items.len();
        let mut values = vec![0.0; users.len() * n_items];
        for ((user_id, movie_id), (sum, count)) in cells {
            let row = user_positions[&user_id];
            let ItemIndex(col) = item_positions[&movie_id];
            values[row * n_items + col] = sum / f64::from(count);
        }

        Self {
            users,
            items,
            item_positions,
            values,
            ratings_used,
            dropped_ratings,
        }
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Column labels, in column order
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.items
    }

    /// Row labels, in row order
    pub fn user_ids(&self) -> &[UserId] {
        &self.users
    }

    pub fn item_index(&self, movie_id: MovieId) -> Option<ItemIndex> {
        self.item_positions.get(&movie_id).copied()
    }

    pub fn movie_id(&self, index: ItemIndex) -> MovieId {
        self.items[index.0]
    }

    pub fn get(&self, user: UserIndex, item: ItemIndex) -> f64 {
        self.values[user.0 * self.n_items() + item.0]
    }

    pub fn row(&self, user: UserIndex) -> &[f64] {
        let width = self.n_items();
        &self.values[user.0 * width..(user.0 + 1) * width]
    }

    /// All rows in user order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero width
        let width = self.n_items().max(1);
        self.values.chunks_exact(width)
    }

    /// One movie's ratings across all users
    pub fn column(&self, item: ItemIndex) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[item.0])
    }

    /// Ratings that survived the join, duplicates included
    pub fn ratings_used(&self) -> usize {
        self.ratings_used
    }

    /// Ratings whose movie is not in the catalog or whose value is not finite
    pub fn dropped_ratings(&self) -> usize {
        self.dropped_ratings
    }
}
