pub mod idea_cards;
