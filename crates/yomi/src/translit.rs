//! 選択的翻字
//!
//! 頻度ランキングに基づき、上位 N 位に入らない（= 読者が知らない
//! 可能性が高い）漢字を含むトークンだけをかな読みに置き換える。
//! 上位の漢字はそのまま残すため、学習者向けの「部分ルビ」的な
//! 出力になる。

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::AnalysisResult;

/// Kanji ordered by newspaper corpus frequency, most frequent first.
///
/// Derived from the standard newspaper frequency ranking; characters
/// beyond this table are treated as rarer than any listed one.
const KANJI_BY_FREQUENCY: &str = "\
日一国会人年大十二本中長出三同時政事自行社見月分議後前民生連五発間対上部東者党地合市業内相方四定今回新場金員九入選立開手米力学問高代明実円関決子動京全目表戦経通外最言氏現理調体化田当八六約主題下首意法不来作性的要用制治度務強気小七成期公持野協取都和統以機平総加山思家話世受区領多県続進正安設保改数記院女初北午指権心界支第産結百派点教報済書府活原先共得解名交資予川向際査勝面委告軍文反元重近千考判認画海参売利組知案道信策集在件団別物側任引使求所次水半品昨論計死官増係感特情投示変打男基私各始島直両朝革価式確村提運終挙果西勢減台広容必応演電歳住争談能無再位置企真流格有疑口過局少放税検藤町常校料沢裁状工建語球営空職証土与急止送援供可役構木割聞身費付施切由説転食比難防補車優夫研収断井何南石足違消境神番規術護展態導鮮備宅害配副算視条幹独警宮究育席輸訪楽起万着乗店述残想線率病農州武声質念待試族象銀域助労例衛然早張映限親額監環験追審商葉義伝働形景落欧担好退準賞訴辺造英被株頭技低毎医復仕去姿味負閣韓渡失移差衆個門写評課末守若脳極種美岡影命含福蔵量望松非撃佐核観察整段横融型白深字答夜製票況音申様財港識注呼渉達\
右雨王火花貝休玉犬左糸耳森青夕赤草竹虫天林羽雲園遠科夏歌絵角丸岩顔汽帰弓牛魚兄戸古光黄谷黒才細矢姉紙寺室弱秋週春色図星晴雪船走太池茶昼鳥弟刀冬読肉馬買麦父風歩母妹鳴毛友曜里悪暗飲泳駅央屋温荷階寒漢館岸客級橋曲苦具君軽血庫湖幸号根祭皿歯詩酒拾習宿暑昭章植昔息速他炭短柱丁帳庭笛鉄豆湯登等童波倍箱畑坂板皮悲鼻筆氷秒服返勉薬油遊羊洋陽旅緑礼列練路愛衣囲胃印栄塩億貨芽械街覚完管願希季紀喜旗器泣救給漁鏡競訓郡径芸欠健固功候航康菜材札刷殺散士史司児辞借周祝順笑唱焼照臣省清静積折節浅倉巣束卒孫帯隊単仲貯兆腸底停典徒努灯堂毒熱敗梅博飯飛標粉兵便包牧満未脈勇養浴陸良輪類令冷歴老録圧因永易益液往桜恩仮河賀快刊慣眼寄逆久旧居許均禁句群潔券険故効厚耕鉱興講混災妻採罪雑酸賛志枝師飼似舎謝授修序招承織精責績接舌絶銭祖素像則測属損貸築程適敵銅徳燃破犯版肥俵貧布婦富複仏編弁墓豊貿暴夢迷綿余預略留異遺宇延沿我灰拡干巻看簡危机揮貴吸胸郷勤筋系敬劇激穴絹憲源厳己誤后孝皇紅降鋼刻穀骨困砂座冊蚕至詞誌磁射捨尺樹宗就従縦縮熟純処署諸除将傷障城蒸針仁垂推寸盛聖誠宣専泉洗染善奏窓創装層操臓存尊探誕暖値宙忠著庁潮賃痛討糖届乳納拝背肺俳班";

/// 頻度ランク表（漢字 → 順位、0 始まり）
fn rank_table() -> &'static HashMap<char, usize> {
  static TABLE: OnceLock<HashMap<char, usize>> = OnceLock::new();
  TABLE.get_or_init(|| {
    KANJI_BY_FREQUENCY.chars().enumerate().map(|(rank, ch)| (ch, rank)).collect()
  })
}

/// CJK 統合漢字（拡張 A を含む）かどうか
#[must_use]
pub fn is_kanji(ch: char) -> bool {
  matches!(ch, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}')
}

/// 漢字 `ch` が頻度上位 `limit` 位に入るかどうか
///
/// 表に載っていない漢字は常に「上位に入らない」扱いになる。
#[must_use]
pub fn is_common(ch: char, limit: usize) -> bool {
  rank_table().get(&ch).is_some_and(|rank| *rank < limit)
}

impl AnalysisResult {
  /// トークン単位の選択的翻字
  ///
  /// 表面形に「上位 `limit` 位に入らない漢字」を含むトークンは
  /// かな読みに置き換え、それ以外は表面形のまま返す。
  #[must_use]
  pub fn selective_translit_parts(&self, limit: usize) -> Vec<String> {
    self
      .tokens
      .iter()
      .map(|token| {
        let has_rare_kanji =
          token.surface.chars().any(|ch| is_kanji(ch) && !is_common(ch, limit));
        if token.is_lexical && has_rare_kanji {
          token.kana.clone()
        } else {
          token.surface.clone()
        }
      })
      .collect()
  }

  /// 選択的翻字の結合形
  ///
  /// 元テキストの形を保つため、区切りは挿入しない。
  #[must_use]
  pub fn selective_translit(&self, limit: usize) -> String {
    self.selective_translit_parts(limit).concat()
  }
}
