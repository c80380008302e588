//! Two-player Durak against a bot, 36-card deck.
//!
//! The human acts through [`Action::PlayCard`], [`Action::Take`] and
//! [`Action::Enough`]; the bot acts on its own ticks. Anything the rules do
//! not allow is ignored and leaves the table exactly as it was.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::DurakConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Six = 6,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Same suit and higher rank, or a trump over a non-trump.
pub fn can_beat(attack: Card, defense: Card, trump: Suit) -> bool {
    if defense.suit == attack.suit {
        defense.rank > attack.rank
    } else {
        defense.suit == trump
    }
}

/// How reluctant the bot is to part with a card. Trumps are kept longest.
fn bot_value(card: Card, trump: Suit) -> u8 {
    let bonus = if card.suit == trump { 100 } else { 0 };
    card.rank.value() + bonus
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Human,
    Bot,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Bot,
            Side::Bot => Side::Human,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSlot {
    pub attack: Card,
    pub defense: Option<Card>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HumanWins,
    BotWins,
    Draw,
}

pub struct DurakView<'a> {
    pub human_hand: &'a [Card],
    pub bot_hand_len: usize,
    pub deck_len: usize,
    pub discard_len: usize,
    pub trump: Card,
    pub table: &'a [TableSlot],
    pub attacker: Side,
    pub outcome: Option<Outcome>,
    pub bot_thinking: bool,
    pub round: u32,
}

pub struct Durak {
    config: DurakConfig,
    rng: StdRng,
    /// Index 0 is drawn next; the trump card sits at the end.
    deck: Vec<Card>,
    trump: Card,
    human: Vec<Card>,
    bot: Vec<Card>,
    discard: Vec<Card>,
    table: Vec<TableSlot>,
    attacker: Side,
    outcome: Option<Outcome>,
    bot_wait: u32,
    round: u32,
    feedback: Vec<Feedback>,
}

impl Durak {
    pub fn new(config: DurakConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DurakConfig, mut rng: StdRng) -> Self {
        let mut deck = full_deck();
        deck.shuffle(&mut rng);

        let mut human = Vec::with_capacity(config.hand_size);
        let mut bot = Vec::with_capacity(config.hand_size);
        for _ in 0..config.hand_size {
            human.push(deck.remove(0));
            bot.push(deck.remove(0));
        }
        let trump = deck.remove(0);
        deck.push(trump);

        let attacker = Self::first_attacker(&human, &bot, trump.suit);
        log::info!("durak: trump {}, {:?} attacks first", trump, attacker);

        let mut durak = Self {
            deck,
            trump,
            human,
            bot,
            discard: Vec::new(),
            table: Vec::new(),
            attacker,
            outcome: None,
            bot_wait: config.bot_delay_ticks,
            round: 1,
            feedback: Vec::new(),
            config,
            rng,
        };
        durak.sort_hands();
        durak
    }

    /// Whoever holds the lowest trump leads; the human if nobody does.
    fn first_attacker(human: &[Card], bot: &[Card], trump: Suit) -> Side {
        let lowest = |hand: &[Card]| {
            hand.iter()
                .filter(|c| c.suit == trump)
                .map(|c| c.rank)
                .min()
        };
        match (lowest(human), lowest(bot)) {
            (_, None) => Side::Human,
            (None, Some(_)) => Side::Bot,
            (Some(h), Some(b)) if b < h => Side::Bot,
            _ => Side::Human,
        }
    }

    pub fn view(&self) -> DurakView<'_> {
        DurakView {
            human_hand: &self.human,
            bot_hand_len: self.bot.len(),
            deck_len: self.deck.len(),
            discard_len: self.discard.len(),
            trump: self.trump,
            table: &self.table,
            attacker: self.attacker,
            outcome: self.outcome,
            bot_thinking: self.bot_to_act(),
            round: self.round,
        }
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    pub fn hand(&self, side: Side) -> &[Card] {
        match side {
            Side::Human => &self.human,
            Side::Bot => &self.bot,
        }
    }

    pub fn table(&self) -> &[TableSlot] {
        &self.table
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn attacker(&self) -> Side {
        self.attacker
    }

    pub fn defender(&self) -> Side {
        self.attacker.other()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Cards in the deck, both hands, on the table and discarded.
    pub fn cards_in_play(&self) -> usize {
        let on_table: usize = self
            .table
            .iter()
            .map(|s| 1 + usize::from(s.defense.is_some()))
            .sum();
        self.deck.len() + self.human.len() + self.bot.len() + on_table + self.discard.len()
    }

    fn hand_mut(&mut self, side: Side) -> &mut Vec<Card> {
        match side {
            Side::Human => &mut self.human,
            Side::Bot => &mut self.bot,
        }
    }

    fn sort_hands(&mut self) {
        let trump = self.trump.suit;
        let key = |c: &Card| (c.suit == trump, c.rank, c.suit);
        self.human.sort_by_key(key);
        self.bot.sort_by_key(key);
    }

    fn oldest_undefended(&self) -> Option<usize> {
        self.table.iter().position(|s| s.defense.is_none())
    }

    fn undefended_count(&self) -> usize {
        self.table.iter().filter(|s| s.defense.is_none()).count()
    }

    fn rank_on_table(&self, rank: Rank) -> bool {
        self.table
            .iter()
            .any(|s| s.attack.rank == rank || s.defense.map(|d| d.rank) == Some(rank))
    }

    pub fn can_attack_with(&self, card: Card) -> bool {
        if self.table.len() >= self.config.max_table_slots {
            return false;
        }
        if self.undefended_count() >= self.hand(self.defender()).len() {
            return false;
        }
        self.table.is_empty() || self.rank_on_table(card.rank)
    }

    pub fn can_defend_with(&self, card: Card) -> bool {
        match self.oldest_undefended() {
            Some(i) => can_beat(self.table[i].attack, card, self.trump.suit),
            None => false,
        }
    }

    fn attack(&mut self, side: Side, index: usize) -> bool {
        if self.outcome.is_some() || side != self.attacker {
            return false;
        }
        let Some(&card) = self.hand(side).get(index) else {
            return false;
        };
        if !self.can_attack_with(card) {
            return false;
        }
        self.hand_mut(side).remove(index);
        self.table.push(TableSlot {
            attack: card,
            defense: None,
        });
        log::debug!("durak: {:?} attacks with {}", side, card);
        true
    }

    fn defend(&mut self, side: Side, index: usize) -> bool {
        if self.outcome.is_some() || side != self.defender() {
            return false;
        }
        let Some(&card) = self.hand(side).get(index) else {
            return false;
        };
        let Some(slot) = self.oldest_undefended() else {
            return false;
        };
        if !can_beat(self.table[slot].attack, card, self.trump.suit) {
            return false;
        }
        self.hand_mut(side).remove(index);
        self.table[slot].defense = Some(card);
        log::debug!("durak: {:?} beats {} with {}", side, self.table[slot].attack, card);
        true
    }

    fn take(&mut self, side: Side) -> bool {
        if self.outcome.is_some() || side != self.defender() || self.oldest_undefended().is_none() {
            return false;
        }
        let cards: Vec<Card> = self
            .table
            .drain(..)
            .flat_map(|s| std::iter::once(s.attack).chain(s.defense))
            .collect();
        log::info!("durak: {:?} takes {} card(s)", side, cards.len());
        self.hand_mut(side).extend(cards);
        // The taker defends again next round.
        self.finish_round(false);
        true
    }

    fn enough(&mut self, side: Side) -> bool {
        if self.outcome.is_some()
            || side != self.attacker
            || self.table.is_empty()
            || self.oldest_undefended().is_some()
        {
            return false;
        }
        self.beaten();
        true
    }

    fn beaten(&mut self) {
        let cards = self
            .table
            .drain(..)
            .flat_map(|s| std::iter::once(s.attack).chain(s.defense));
        self.discard.extend(cards);
        log::info!("durak: round {} beaten off by {:?}", self.round, self.defender());
        self.finish_round(true);
    }

    /// Refill attacker first, then defender, then settle roles and the winner.
    fn finish_round(&mut self, swap_roles: bool) {
        let attacker = self.attacker;
        self.refill(attacker);
        self.refill(attacker.other());
        if swap_roles {
            self.attacker = attacker.other();
        }
        self.round += 1;
        self.sort_hands();
        self.check_outcome();
    }

    fn refill(&mut self, side: Side) {
        let target = self.config.hand_size;
        while self.hand(side).len() < target && !self.deck.is_empty() {
            let card = self.deck.remove(0);
            self.hand_mut(side).push(card);
        }
    }

    /// Close the round on its own once nothing more can happen in it.
    fn auto_resolve(&mut self) {
        if self.table.is_empty() || self.oldest_undefended().is_some() {
            return;
        }
        let attacker_out = self.hand(self.attacker).is_empty();
        let defender_out = self.hand(self.defender()).is_empty();
        let table_full = self.table.len() >= self.config.max_table_slots;
        if attacker_out || defender_out || table_full {
            self.beaten();
        }
    }

    fn check_outcome(&mut self) {
        if !self.deck.is_empty() || self.outcome.is_some() {
            return;
        }
        let outcome = match (self.human.is_empty(), self.bot.is_empty()) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::HumanWins,
            (false, true) => Outcome::BotWins,
            (false, false) => return,
        };
        self.outcome = Some(outcome);
        self.feedback.push(match outcome {
            Outcome::HumanWins => Feedback::Win,
            Outcome::BotWins => Feedback::Lose,
            Outcome::Draw => Feedback::Draw,
        });
        self.feedback.push(Feedback::GameOver);
        log::info!("durak: {:?} after {} rounds", outcome, self.round);
    }

    fn after_move(&mut self) {
        self.auto_resolve();
        self.sort_hands();
    }

    fn bot_to_act(&self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let pending = self.oldest_undefended().is_some();
        match self.attacker {
            Side::Bot => !pending,
            Side::Human => pending,
        }
    }

    fn bot_act(&mut self) {
        let trump = self.trump.suit;
        if self.attacker == Side::Human {
            let choice = self
                .bot
                .iter()
                .enumerate()
                .filter(|(_, &c)| self.can_defend_with(c))
                .min_by_key(|(_, &c)| bot_value(c, trump))
                .map(|(i, _)| i);
            match choice {
                Some(i) => {
                    self.defend(Side::Bot, i);
                }
                None => {
                    self.take(Side::Bot);
                }
            }
        } else {
            let choice = self
                .bot
                .iter()
                .enumerate()
                .filter(|(_, &c)| self.can_attack_with(c))
                .min_by_key(|(_, &c)| bot_value(c, trump))
                .map(|(i, _)| i);
            match choice {
                Some(i) => {
                    self.attack(Side::Bot, i);
                }
                None => {
                    self.enough(Side::Bot);
                }
            }
        }
        self.after_move();
    }
}

impl Game for Durak {
    fn start(&mut self) {}

    fn tick(&mut self) {
        if !self.bot_to_act() {
            self.bot_wait = self.config.bot_delay_ticks;
            return;
        }
        self.bot_wait = self.bot_wait.saturating_sub(1);
        if self.bot_wait == 0 {
            self.bot_act();
            self.bot_wait = self.config.bot_delay_ticks;
        }
    }

    fn handle_action(&mut self, action: Action) {
        let applied = match action {
            Action::PlayCard(i) | Action::Select(i) => {
                if self.attacker == Side::Human {
                    self.attack(Side::Human, i)
                } else {
                    self.defend(Side::Human, i)
                }
            }
            Action::Take => self.take(Side::Human),
            Action::Enough => self.enough(Side::Human),
            _ => false,
        };
        if applied {
            self.after_move();
        }
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Durak::with_rng(self.config.clone(), rng);
    }

    fn score(&self) -> u32 {
        u32::from(self.outcome == Some(Outcome::HumanWins))
    }

    fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// A mid-game position with trump hearts and a known deck.
    fn arranged(attacker: Side, human: Vec<Card>, bot: Vec<Card>, deck: Vec<Card>) -> Durak {
        let mut durak = Durak::new(DurakConfig::default(), 99);
        durak.trump = c(Rank::Nine, Suit::Hearts);
        durak.human = human;
        durak.bot = bot;
        durak.deck = deck;
        durak.discard.clear();
        durak.table.clear();
        durak.attacker = attacker;
        durak.sort_hands();
        durak
    }

    fn index_of(durak: &Durak, side: Side, card: Card) -> usize {
        durak.hand(side).iter().position(|&h| h == card).unwrap()
    }

    fn tick_until_bot_moves(durak: &mut Durak) {
        for _ in 0..DurakConfig::default().bot_delay_ticks {
            durak.tick();
        }
    }

    #[test]
    fn deal_gives_six_each_and_keeps_trump_last() {
        let durak = Durak::new(DurakConfig::default(), 5);
        assert_eq!(durak.hand(Side::Human).len(), 6);
        assert_eq!(durak.hand(Side::Bot).len(), 6);
        assert_eq!(durak.deck_len(), 24);
        assert_eq!(durak.deck.last(), Some(&durak.trump));
        assert_eq!(durak.cards_in_play(), 36);
    }

    #[test]
    fn beat_rules() {
        let trump = Suit::Hearts;
        assert!(can_beat(c(Rank::Seven, Suit::Spades), c(Rank::Ten, Suit::Spades), trump));
        assert!(!can_beat(c(Rank::Ten, Suit::Spades), c(Rank::Seven, Suit::Spades), trump));
        assert!(can_beat(c(Rank::Ace, Suit::Spades), c(Rank::Six, Suit::Hearts), trump));
        assert!(!can_beat(c(Rank::Six, Suit::Hearts), c(Rank::Ace, Suit::Spades), trump));
        assert!(can_beat(c(Rank::Six, Suit::Hearts), c(Rank::Seven, Suit::Hearts), trump));
        assert!(!can_beat(c(Rank::Seven, Suit::Clubs), c(Rank::Ace, Suit::Diamonds), trump));
    }

    #[test]
    fn lowest_trump_leads() {
        let human = [c(Rank::Ten, Suit::Hearts), c(Rank::Six, Suit::Clubs)];
        let bot = [c(Rank::Seven, Suit::Hearts)];
        assert_eq!(Durak::first_attacker(&human, &bot, Suit::Hearts), Side::Bot);
        assert_eq!(Durak::first_attacker(&human, &[], Suit::Hearts), Side::Human);
        assert_eq!(Durak::first_attacker(&[], &[], Suit::Hearts), Side::Human);
    }

    #[test]
    fn defender_without_a_beat_takes_the_card() {
        let human = vec![
            c(Rank::Six, Suit::Spades),
            c(Rank::Eight, Suit::Clubs),
            c(Rank::Nine, Suit::Diamonds),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Jack, Suit::Diamonds),
            c(Rank::Queen, Suit::Clubs),
        ];
        let bot = vec![
            c(Rank::Seven, Suit::Spades),
            c(Rank::King, Suit::Clubs),
            c(Rank::Ace, Suit::Diamonds),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Ten, Suit::Spades),
            c(Rank::Jack, Suit::Clubs),
        ];
        let deck = vec![c(Rank::Six, Suit::Diamonds), c(Rank::Nine, Suit::Hearts)];
        let mut durak = arranged(Side::Bot, human, bot, deck);

        let seven = index_of(&durak, Side::Bot, c(Rank::Seven, Suit::Spades));
        assert!(durak.attack(Side::Bot, seven));

        let six = index_of(&durak, Side::Human, c(Rank::Six, Suit::Spades));
        durak.handle_action(Action::PlayCard(six));
        assert_eq!(durak.table()[0].defense, None);
        assert_eq!(durak.hand(Side::Human).len(), 6);

        durak.handle_action(Action::Take);
        assert_eq!(durak.hand(Side::Human).len(), 7);
        assert!(durak.table().is_empty());
        assert!(durak.hand(Side::Human).contains(&c(Rank::Seven, Suit::Spades)));
        // Attacker refilled from the deck and keeps attacking.
        assert_eq!(durak.hand(Side::Bot).len(), 6);
        assert_eq!(durak.attacker(), Side::Bot);
        assert_eq!(durak.cards_in_play(), 14);
    }

    #[test]
    fn follow_up_attack_must_match_a_table_rank() {
        let human = vec![
            c(Rank::Seven, Suit::Clubs),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Ten, Suit::Clubs),
        ];
        let bot = vec![
            c(Rank::Ace, Suit::Clubs),
            c(Rank::Six, Suit::Spades),
            c(Rank::Eight, Suit::Spades),
        ];
        let mut durak = arranged(Side::Human, human, bot, vec![c(Rank::Six, Suit::Hearts)]);

        let seven = index_of(&durak, Side::Human, c(Rank::Seven, Suit::Clubs));
        durak.handle_action(Action::PlayCard(seven));
        assert_eq!(durak.table().len(), 1);

        let queen = index_of(&durak, Side::Human, c(Rank::Queen, Suit::Spades));
        durak.handle_action(Action::PlayCard(queen));
        assert_eq!(durak.table().len(), 1);

        let other_seven = index_of(&durak, Side::Human, c(Rank::Seven, Suit::Diamonds));
        durak.handle_action(Action::PlayCard(other_seven));
        assert_eq!(durak.table().len(), 2);
    }

    #[test]
    fn attacks_capped_by_defender_hand() {
        let human = vec![
            c(Rank::Seven, Suit::Clubs),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Seven, Suit::Spades),
        ];
        let bot = vec![c(Rank::Ace, Suit::Clubs), c(Rank::Six, Suit::Spades)];
        let mut durak = arranged(Side::Human, human, bot, vec![c(Rank::Six, Suit::Hearts)]);
        durak.handle_action(Action::PlayCard(0));
        durak.handle_action(Action::PlayCard(0));
        durak.handle_action(Action::PlayCard(0));
        assert_eq!(durak.table().len(), 2);
        assert_eq!(durak.hand(Side::Human).len(), 1);
    }

    #[test]
    fn bot_defends_with_cheapest_beat() {
        let human = vec![c(Rank::Eight, Suit::Spades), c(Rank::Six, Suit::Clubs)];
        let bot = vec![
            c(Rank::Ace, Suit::Spades),
            c(Rank::Nine, Suit::Spades),
            c(Rank::Six, Suit::Hearts),
        ];
        let deck = vec![c(Rank::Ten, Suit::Diamonds)];
        let mut durak = arranged(Side::Human, human, bot, deck);

        let eight = index_of(&durak, Side::Human, c(Rank::Eight, Suit::Spades));
        durak.handle_action(Action::PlayCard(eight));
        tick_until_bot_moves(&mut durak);
        assert_eq!(durak.table()[0].defense, Some(c(Rank::Nine, Suit::Spades)));
    }

    #[test]
    fn bot_takes_when_nothing_beats() {
        let human = vec![c(Rank::Ace, Suit::Hearts), c(Rank::Six, Suit::Clubs)];
        let bot = vec![c(Rank::King, Suit::Hearts), c(Rank::Six, Suit::Spades)];
        let deck = vec![c(Rank::Ten, Suit::Diamonds), c(Rank::Seven, Suit::Diamonds)];
        let mut durak = arranged(Side::Human, human, bot, deck);

        let ace = index_of(&durak, Side::Human, c(Rank::Ace, Suit::Hearts));
        durak.handle_action(Action::PlayCard(ace));
        tick_until_bot_moves(&mut durak);
        assert!(durak.table().is_empty());
        assert_eq!(durak.hand(Side::Bot).len(), 3);
        assert_eq!(durak.attacker(), Side::Human);
        // Human refilled first and took both deck cards.
        assert_eq!(durak.hand(Side::Human).len(), 3);
        assert_eq!(durak.deck_len(), 0);
    }

    #[test]
    fn enough_discards_refills_attacker_first_and_swaps() {
        let human = vec![c(Rank::Seven, Suit::Clubs), c(Rank::Ten, Suit::Diamonds)];
        let bot = vec![c(Rank::Jack, Suit::Clubs), c(Rank::Six, Suit::Spades)];
        let deck = vec![c(Rank::Queen, Suit::Diamonds)];
        let mut durak = arranged(Side::Human, human, bot, deck);

        let seven = index_of(&durak, Side::Human, c(Rank::Seven, Suit::Clubs));
        durak.handle_action(Action::PlayCard(seven));
        tick_until_bot_moves(&mut durak);
        assert_eq!(durak.table()[0].defense, Some(c(Rank::Jack, Suit::Clubs)));

        durak.handle_action(Action::Enough);
        assert!(durak.table().is_empty());
        assert_eq!(durak.discard.len(), 2);
        assert_eq!(durak.hand(Side::Human).len(), 2);
        assert!(durak.hand(Side::Human).contains(&c(Rank::Queen, Suit::Diamonds)));
        assert_eq!(durak.hand(Side::Bot).len(), 1);
        assert_eq!(durak.attacker(), Side::Bot);
    }

    #[test]
    fn enough_rejected_while_attack_pending() {
        let human = vec![c(Rank::Seven, Suit::Clubs), c(Rank::Ten, Suit::Diamonds)];
        let bot = vec![c(Rank::Jack, Suit::Clubs)];
        let mut durak = arranged(Side::Human, human, bot, vec![c(Rank::Six, Suit::Hearts)]);
        durak.handle_action(Action::Enough);
        assert_eq!(durak.attacker(), Side::Human);
        durak.handle_action(Action::PlayCard(0));
        durak.handle_action(Action::Enough);
        assert_eq!(durak.table().len(), 1);
        assert_eq!(durak.attacker(), Side::Human);
    }

    #[test]
    fn emptying_hand_with_empty_deck_wins() {
        let human = vec![c(Rank::Seven, Suit::Clubs)];
        let bot = vec![c(Rank::Jack, Suit::Clubs), c(Rank::Six, Suit::Spades)];
        let mut durak = arranged(Side::Human, human, bot, Vec::new());

        durak.handle_action(Action::PlayCard(0));
        tick_until_bot_moves(&mut durak);
        // Attacker is out of cards, so the round closes by itself.
        assert!(durak.table().is_empty());
        assert_eq!(durak.outcome(), Some(Outcome::HumanWins));
        assert!(durak.is_game_over());
        let fb = durak.drain_feedback();
        assert!(fb.contains(&Feedback::Win));

        durak.handle_action(Action::PlayCard(0));
        assert_eq!(durak.hand(Side::Bot).len(), 1);
    }

    #[test]
    fn bot_attacks_lowest_non_trump() {
        let human = vec![c(Rank::Ace, Suit::Spades), c(Rank::King, Suit::Spades)];
        let bot = vec![
            c(Rank::Six, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Seven, Suit::Diamonds),
        ];
        let mut durak = arranged(Side::Bot, human, bot, vec![c(Rank::Six, Suit::Clubs)]);
        tick_until_bot_moves(&mut durak);
        assert_eq!(durak.table()[0].attack, c(Rank::Seven, Suit::Diamonds));
    }

    #[test]
    fn restart_deals_a_fresh_game() {
        let mut durak = Durak::new(DurakConfig::default(), 8);
        durak.handle_action(Action::Take);
        durak.table.clear();
        durak.human.clear();
        durak.restart();
        assert_eq!(durak.hand(Side::Human).len(), 6);
        assert_eq!(durak.cards_in_play(), 36);
        assert_eq!(durak.outcome(), None);
    }
}
